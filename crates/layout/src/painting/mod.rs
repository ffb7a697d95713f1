pub mod borders;
