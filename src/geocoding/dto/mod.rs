pub mod autocomplete_dto;
