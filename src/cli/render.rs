use crate::core::Block;
use crate::error::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde::Serialize;

// Hashes in the ledger table are cut to this many hex characters
const SHORT_HASH_LEN: usize = 12;

fn short_hash(hash: &str) -> String {
    if hash.chars().count() > SHORT_HASH_LEN {
        let head: String = hash.chars().take(SHORT_HASH_LEN).collect();
        format!("{head}…")
    } else {
        hash.to_string()
    }
}

/// One row per block, genesis first.
pub fn ledger_table(blocks: &[Block]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "#", "Sender", "Receiver", "Amount", "Creator", "Time", "Nonce", "Prev hash", "Hash",
        ]);

    for (index, block) in blocks.iter().enumerate() {
        let (sender, receiver, amount) = match block.get_record() {
            Some(record) => (
                record.get_sender().to_string(),
                record.get_receiver().to_string(),
                format!("{:?}", record.get_amount()),
            ),
            None => (block.get_payload().to_string(), String::new(), String::new()),
        };
        table.add_row(vec![
            Cell::new(index),
            Cell::new(sender),
            Cell::new(receiver),
            Cell::new(amount),
            Cell::new(block.get_creator_id()),
            Cell::new(block.get_timestamp()),
            Cell::new(block.get_nonce()),
            Cell::new(short_hash(block.get_prev_hash())),
            Cell::new(short_hash(&block.hash())),
        ]);
    }
    table
}

#[derive(Serialize)]
struct BlockView<'a> {
    index: usize,
    hash: String,
    #[serde(flatten)]
    block: &'a Block,
}

/// Pretty JSON of one block including its computed hash.
pub fn inspect_block(index: usize, block: &Block) -> Result<String> {
    let view = BlockView {
        index,
        hash: block.hash(),
        block,
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Record;

    #[test]
    fn test_short_hash() {
        assert_eq!(short_hash("0"), "0");
        assert_eq!(short_hash(&"a".repeat(64)), format!("{}…", "a".repeat(12)));
    }

    #[test]
    fn test_ledger_table_rows() {
        let record = Record::new("Alice", "Bob", 50.0).unwrap();
        let blocks = vec![
            Block::genesis(),
            Block::with_timestamp(record, 42, "abc", "10:00:00"),
        ];
        let rendered = ledger_table(&blocks).to_string();
        assert!(rendered.contains("Genesis"));
        assert!(rendered.contains("Alice"));
        assert!(rendered.contains("50.0"));
        assert!(rendered.contains("10:00:00"));
    }

    #[test]
    fn test_inspect_block_json() {
        let record = Record::new("Alice", "Bob", 50.0).unwrap();
        let block = Block::with_timestamp(record, 42, "abc", "10:00:00");
        let json = inspect_block(1, &block).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["index"], 1);
        assert_eq!(value["hash"], block.hash());
        assert_eq!(value["creator_id"], 42);
        assert_eq!(value["prev_hash"], "abc");
        assert_eq!(value["payload"]["Transfer"]["sender"], "Alice");
    }
}
