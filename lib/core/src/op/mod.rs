pub mod allsat;
