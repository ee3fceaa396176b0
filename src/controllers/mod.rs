pub mod damage_controller;
