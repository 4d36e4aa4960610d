/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![no_main]

use libfuzzer_sys::fuzz_target;
use pictor_core::bytestream::PCursor;

fuzz_target!(|data: &[u8]| {
    let mut decoder = pictor_netpbm::NetpbmDecoder::new(PCursor::new(data));
    let _ = decoder.decode();
});
