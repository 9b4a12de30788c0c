//! Infrastructure layer: storage, completion client and wire DTOs.

pub mod completion;
pub mod dto;
pub mod repository;
