//! Working with dynamic values and encoder options.
//!
//! Run with: cargo run --example dynamic

use std::error::Error;
use toon_codec::{decode, encode, encode_with_options, toon, Delimiter, EncodeOptions, Value};

fn main() -> Result<(), Box<dyn Error>> {
    // Build a document without defining any structs.
    let doc = toon!({
        "service": "search",
        "replicas": 3,
        "endpoints": [
            { "host": "a.internal", "port": 9200 },
            { "host": "b.internal", "port": 9200 }
        ]
    });

    let text = encode(&doc)?;
    println!("Default encoding:\n{}\n", text);

    // Pipe-delimited, with explicit length markers.
    let options = EncodeOptions::new()
        .with_delimiter(Delimiter::Pipe)
        .with_length_marker('#');
    println!(
        "Pipe delimiter with length markers:\n{}\n",
        encode_with_options(&doc, &options)?
    );

    // Decode and poke at the tree.
    let back = decode(&text)?;
    let first_port = back
        .get("endpoints")
        .and_then(Value::as_array)
        .and_then(|eps| eps[0].get("port"))
        .and_then(Value::as_i64);
    println!("✓ First endpoint port: {:?}", first_port);

    Ok(())
}
