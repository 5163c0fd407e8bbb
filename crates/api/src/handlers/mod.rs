pub mod landing_rows;
