pub mod profile;
pub mod shot_zones;
pub mod similarity;
