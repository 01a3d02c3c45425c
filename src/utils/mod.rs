pub mod leaf_text;
