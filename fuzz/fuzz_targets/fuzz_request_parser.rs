#![no_main]

use std::io;

use arbitrary::Arbitrary;
use httpfromtcp::{ByteSource, ReaderLimits, Request, read_request};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    chunk_size: u8,
    initial_buffer_size: u8,
    data: Vec<u8>,
}

struct ChunkSource<'a> {
    data: &'a [u8],
    chunk_size: usize,
}

impl ByteSource for ChunkSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk_size.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fuzz_target!(|input: FuzzInput| {
    let limits = ReaderLimits {
        initial_buffer_size: usize::from(input.initial_buffer_size).max(1),
        max_buffer_size: 64 * 1024,
        max_body_size: 64 * 1024,
        max_headers_count: 256,
    };

    // 一度に読む
    let mut data = input.data.as_slice();
    let Ok(one_shot) = read_request(&mut data, &limits) else {
        return;
    };

    // 分割して読む
    let mut source = ChunkSource {
        data: &input.data,
        chunk_size: usize::from(input.chunk_size).max(1),
    };
    let Ok(chunked) = read_request(&mut source, &limits) else {
        return;
    };

    assert_eq!(one_shot, chunked);

    // パースに成功したリクエストは宣言どおりのボディを持つ
    if let Ok(request) = Request::into_result(chunked) {
        if let Ok(Some(len)) = request.headers().content_length() {
            assert_eq!(request.body().len(), len);
        }
    }
});
