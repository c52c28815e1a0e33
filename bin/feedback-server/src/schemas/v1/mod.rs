pub mod downloads;
