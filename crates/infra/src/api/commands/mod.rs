//! Domain operations on [`super::ApiClient`], grouped by backend resource

mod accounts;
mod auth;
mod brokerage;
mod catalog;
mod goals;
mod investments;
mod pin;
mod profile;
mod transactions;
