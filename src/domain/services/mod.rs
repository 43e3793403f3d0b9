pub mod area_range;
