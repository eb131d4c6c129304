pub mod portal_repository;
