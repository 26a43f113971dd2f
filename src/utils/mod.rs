//! Small text-shaping helpers shared by the composer

pub mod text;
