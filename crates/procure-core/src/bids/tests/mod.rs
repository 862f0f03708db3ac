mod common;
mod comparison;
mod ranking;
mod routing;
mod service;
