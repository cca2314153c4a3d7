//! Staple
//!
//! Browser client for the stack based bookmark, built with Leptos (WASM).
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The session token lives in a `token` cookie; every screen
//! talks to the Staple REST API over HTTP and reports failures with a
//! blocking alert.

use leptos::*;

mod alert;
mod api;
mod app;
mod components;
mod forms;
mod pages;
mod routes;
mod scope;
mod session;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
