/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::prelude::*;
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
pub struct FuzzCase {
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug)]
pub enum RandomCommand {
    Len,
    GetPosition,
    SetPosition(u16),
    WriteBytes(Vec<u8>),
}

pub fn harness(data: FuzzCase) {
    let mut idx = 0;
    let mut buffer = vec![];
    let mut buffer2 = vec![];

    let mut writer = MemByteWriterVec::new(&mut buffer2);
    for command in data.commands {
        match command {
            RandomCommand::Len => {
                assert_eq!(writer.byte_len().unwrap(), buffer.len() as u64);
            }
            RandomCommand::GetPosition => {
                assert_eq!(writer.byte_pos().unwrap(), idx as u64);
            }
            RandomCommand::SetPosition(byte_index) => {
                let byte_index = byte_index as usize;
                let result = writer.set_byte_pos(byte_index as u64);
                assert_eq!(result.is_ok(), byte_index <= buffer.len());
                if result.is_ok() {
                    idx = byte_index;
                }
            }
            RandomCommand::WriteBytes(bytes) => {
                if idx + bytes.len() > buffer.len() {
                    buffer.resize(idx + bytes.len(), 0);
                }
                assert!(writer.write_bytes(&bytes).is_ok());
                buffer[idx..idx + bytes.len()].copy_from_slice(&bytes);
                idx += bytes.len();
            }
        };
    }
    drop(writer);
    assert_eq!(buffer, buffer2);
}
