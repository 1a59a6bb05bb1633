// End-to-end tests for the Podcast Studio HTTP API
//
// Each test gets its own server on an ephemeral port, wired to a fake
// speech synthesis backend and an in-process storage deployment that
// speaks the same function API as the hosted one.

mod helpers;
mod test_files;
mod test_podcasts;
