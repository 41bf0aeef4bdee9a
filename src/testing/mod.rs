pub mod sim_robot;
