pub mod keepa;
