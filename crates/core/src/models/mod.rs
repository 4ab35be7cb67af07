pub mod chart;
pub mod city;
pub mod dashboard;
pub mod field;
pub mod history;
pub mod metrics;
pub mod price;
pub mod retention;
pub mod settings;
