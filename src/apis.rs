pub mod dune;
