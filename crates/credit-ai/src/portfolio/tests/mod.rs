mod borrowers;
mod models;
