use std::io::Write;

use super::Listener;
use crate::error;
use crate::model::*;

// イベントをJSON Lines形式で書き出すListener
pub struct EventWriter<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> EventWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> Listener for EventWriter<W> {
    fn on_event(&mut self, event: &Event) {
        match serde_json::to_string(event) {
            Ok(line) => {
                if let Err(e) = writeln!(self.writer, "{}", line) {
                    error!("event write failed: {}", e);
                }
            }
            Err(e) => error!("event serialize failed: {}", e),
        }
    }
}

#[test]
fn test_event_writer() {
    let mut buf = vec![];
    {
        let mut w = EventWriter::new(&mut buf);
        w.on_event(&Event::Kaigang(EventKaigang {
            indicator: Tile(TM, 1),
        }));
    }
    let line = String::from_utf8(buf).unwrap();
    assert!(line.contains("\"kaigang\""));
    assert!(line.contains("m1"));
}
