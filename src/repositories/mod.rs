pub mod damage_repository;
