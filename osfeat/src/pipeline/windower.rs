use crate::records::packet_record::{CaptureTable, PacketRecord, Schema};

pub type WindowKey = u64;

pub const DEFAULT_WINDOW_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct WindowedRecord {
    pub window: WindowKey,
    pub packet: PacketRecord,
}

#[derive(Debug, Clone)]
pub struct WindowedTable {
    pub schema: Schema,
    pub records: Vec<WindowedRecord>,
}

/// State carried across rows while assigning windows.
struct WindowCursor {
    window: WindowKey,
    count: usize,
    stream: u64,
}

/// Assigns a window key to every packet, in row order.
///
/// A new window opens when the stream id changes or when the current window
/// already holds `window_size` packets. Keys start at 1.
pub fn assign_windows(records: &[PacketRecord], window_size: usize) -> Vec<WindowKey> {
    let Some(first) = records.first() else {
        return Vec::new();
    };

    let start = WindowCursor {
        window: 1,
        count: 1,
        stream: first.stream,
    };

    records
        .iter()
        .scan(start, |cursor, packet| {
            if packet.stream != cursor.stream {
                cursor.stream = packet.stream;
                cursor.window += 1;
                cursor.count = 1;
            } else if cursor.count > window_size {
                cursor.window += 1;
                cursor.count = 1;
            }
            let key = cursor.window;
            cursor.count += 1;
            Some(key)
        })
        .collect()
}

pub fn window_table(table: CaptureTable, window_size: usize) -> WindowedTable {
    let keys = assign_windows(&table.records, window_size);

    WindowedTable {
        schema: table.schema,
        records: keys
            .into_iter()
            .zip(table.records)
            .map(|(window, packet)| WindowedRecord { window, packet })
            .collect(),
    }
}
