pub mod chumsky_text;
pub mod handrolled;
pub mod textcombi;
