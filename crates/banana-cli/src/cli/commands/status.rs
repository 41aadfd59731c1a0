//! Session status handler. Prints who is logged in, never token values.

use anyhow::Result;
use banana_core::session::SessionStore;

pub fn show() -> Result<()> {
    let store = SessionStore::open_default();
    let session = store.session();

    if session.is_authenticated() {
        match &session.username {
            Some(name) => println!("Logged in as {name}."),
            None => println!("Logged in."),
        }
        if !session.has_access() {
            println!("No access token on hand; the next ranked call will need a fresh login.");
        }
    } else {
        println!("Not logged in.");
    }
    Ok(())
}
