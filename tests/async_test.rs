// Async adapter tests (feature = "async-io")

#![cfg(feature = "async-io")]

use std::io::SeekFrom;

use futures_util::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio_util::compat::FuturesAsyncReadCompatExt;
use volstream::{VolatileStream, is_open, snapshot};

#[tokio::test]
async fn test_async_round_trip() {
    let mut stream = VolatileStream::open().unwrap();

    stream.write_all(b"hello async").await.unwrap();
    stream.flush().await.unwrap();
    AsyncSeekExt::seek(&mut stream, SeekFrom::Start(6)).await.unwrap();

    let mut out = Vec::new();
    AsyncReadExt::read_to_end(&mut stream, &mut out).await.unwrap();
    assert_eq!(out, b"async");
}

#[tokio::test]
async fn test_async_seek_past_end_zero_fills() {
    let mut stream = VolatileStream::open().unwrap();

    AsyncSeekExt::seek(&mut stream, SeekFrom::Start(8)).await.unwrap();
    stream.write_all(b"X").await.unwrap();

    let snap = snapshot(stream.handle()).unwrap();
    assert_eq!(&snap[..], b"\0\0\0\0\0\0\0\0X");
}

#[tokio::test]
async fn test_tokio_compat_reader() {
    let mut stream = VolatileStream::open().unwrap();
    stream.write_all(b"bridged through tokio").await.unwrap();
    AsyncSeekExt::seek(&mut stream, SeekFrom::Start(0)).await.unwrap();

    let mut reader = stream.compat();
    let mut text = String::new();
    tokio::io::AsyncReadExt::read_to_string(&mut reader, &mut text)
        .await
        .unwrap();
    assert_eq!(text, "bridged through tokio");
}

#[tokio::test]
async fn test_async_close_keeps_stream_open() {
    let mut stream = VolatileStream::open().unwrap();
    stream.write_all(b"kept").await.unwrap();
    AsyncWriteExt::close(&mut stream).await.unwrap();

    // Only close()/drop release the buffer
    assert!(is_open(stream.handle()));
    assert_eq!(&snapshot(stream.handle()).unwrap()[..], b"kept");

    let handle = stream.handle();
    drop(stream);
    assert!(!is_open(handle));
}
