// End-to-end tests for the review summarizer API
//
// Each test gets its own server on an ephemeral port. Most run over the
// in-memory stores; `test_postgres` gets a fresh database in a shared
// Postgres container.

mod test_analyze;
mod test_events;
mod test_reviews;
mod test_session_profile;
