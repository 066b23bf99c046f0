mod document;
mod round_trip;
