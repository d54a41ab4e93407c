mod collision;
mod scenarios;
mod stress;
