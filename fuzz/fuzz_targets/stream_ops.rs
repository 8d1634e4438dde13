#![no_main]

use std::io::SeekFrom;

use libfuzzer_sys::fuzz_target;
use volstream::{StreamConfig, VolatileStream, snapshot, truncate};

// Replays an operation script against a stream and a plain Vec<u8> model.
fuzz_target!(|data: &[u8]| {
    let config = StreamConfig::new(16, 16).unwrap();
    let mut stream = VolatileStream::open_with(config).unwrap();
    let handle = stream.handle();

    let mut model: Vec<u8> = Vec::new();
    let mut pos: usize = 0;

    for op in data.chunks(3) {
        let arg = op.get(1).copied().unwrap_or(0) as usize * 4 + op.get(2).copied().unwrap_or(0) as usize;
        match op[0] % 4 {
            // write `arg % 64` bytes of a recognizable value
            0 => {
                let bytes = vec![op[0] | 1; arg % 64];
                let n = stream.write(&bytes).unwrap();
                assert_eq!(n, bytes.len());
                if n > 0 {
                    if pos > model.len() {
                        model.resize(pos, 0);
                    }
                    if model.len() < pos + n {
                        model.resize(pos + n, 0);
                    }
                    model[pos..pos + n].copy_from_slice(&bytes);
                    pos += n;
                }
            }
            // read up to `arg % 128` bytes
            1 => {
                let mut buf = vec![0u8; arg % 128];
                let n = stream.read(&mut buf).unwrap();
                let expected = buf.len().min(model.len().saturating_sub(pos));
                assert_eq!(n, expected);
                assert_eq!(&buf[..n], &model[pos..pos + n]);
                pos += n;
            }
            // absolute seek
            2 => {
                let target = arg % 2048;
                assert_eq!(stream.seek(SeekFrom::Start(target as u64)).unwrap(), target as u64);
                if target > model.len() {
                    model.resize(target, 0);
                }
                pos = target;
            }
            // truncate through the handle
            _ => {
                let len = arg % 2048;
                truncate(handle, len as i64).unwrap();
                model.resize(len, 0);
            }
        }

        assert_eq!(stream.len().unwrap(), model.len() as u64);
        assert!(stream.capacity().unwrap() as u64 >= stream.len().unwrap());
    }

    assert_eq!(&snapshot(handle).unwrap()[..], &model[..]);
    stream.close().unwrap();
});
