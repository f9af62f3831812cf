mod formats;
mod lists;
mod tables;
