pub mod account_reader;
pub mod payment_reader;
pub mod result_writer;

/// Shared reader settings: trimmed fields, tolerant record lengths.
fn reader_builder() -> ::csv::ReaderBuilder {
    let mut builder = ::csv::ReaderBuilder::new();
    builder.trim(::csv::Trim::All).flexible(true);
    builder
}
