pub mod body;
pub mod material;
pub mod planet;
pub mod ring;
pub mod star;
