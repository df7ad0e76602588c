mod coercion;
mod schema;
mod types;
mod values;
