pub mod damage_dto;
