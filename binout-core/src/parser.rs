// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The record-stream parser: for one physical file, validate the header,
//! walk its records, and build the file's [`RecordDataPointer`] index.

use crate::command::Command;
use crate::error::{BinoutError, Result};
use crate::header::Header;
use crate::path::Path;
use crate::pod::read_le_uint;
use crate::record::{RecordData, RecordDataPointer, Type};
use std::io::{Read, Seek, SeekFrom};

/// Parse every record in `r`, returning the resulting index.
///
/// `r` must be positioned at offset 0; on return the cursor position is
/// unspecified (the caller only needs the index; any subsequent reads seek
/// explicitly).
pub fn parse_file<R: Read + Seek>(r: &mut R) -> Result<Vec<RecordDataPointer>> {
    let header = Header::read(r)?;

    let file_len = {
        let cur = r.stream_position().map_err(BinoutError::Io)?;
        let end = r.seek(SeekFrom::End(0)).map_err(BinoutError::Io)?;
        r.seek(SeekFrom::Start(cur)).map_err(BinoutError::Io)?;
        end
    };

    let mut index: Vec<RecordDataPointer> = Vec::new();
    let mut current_path = Path::new();

    loop {
        let pos = r.stream_position().map_err(BinoutError::Io)?;
        if pos >= file_len {
            break;
        }

        let record_length = read_le_uint(r, header.record_length_field_size)
            .map_err(|_| BinoutError::RecordLengthTruncated)?;
        let command = read_le_uint(r, header.record_command_field_size)
            .map_err(|_| BinoutError::RecordCommandTruncated)?;

        let header_size =
            header.record_length_field_size as u64 + header.record_command_field_size as u64;
        let record_data_length = record_length.saturating_sub(header_size);

        match Command::from(command) {
            Command::Cd => {
                handle_cd(r, record_data_length, &mut current_path)?;
            }
            Command::Data => {
                handle_data(r, &header, record_data_length, &current_path, &mut index)?;
            }
            other => {
                log::debug!("skipping opaque {} record ({} bytes)", other.name(), record_data_length);
                r.seek(SeekFrom::Current(record_data_length as i64))
                    .map_err(|_| BinoutError::RecordSkipFailed)?;
            }
        }
    }

    Ok(index)
}

fn handle_cd<R: Read + Seek>(
    r: &mut R,
    record_data_length: u64,
    current_path: &mut Path,
) -> Result<()> {
    let mut buf = vec![0u8; record_data_length as usize];
    r.read_exact(&mut buf)
        .map_err(|_| BinoutError::CdPathTruncated)?;

    let raw = String::from_utf8_lossy(&buf);

    if Path::is_abs(&raw) || current_path.is_empty() {
        *current_path = Path::elements(&raw);
    } else {
        let rel = Path::elements(&raw);
        current_path.join(&rel);
    }

    current_path.parse();

    Ok(())
}

fn handle_data<R: Read + Seek>(
    r: &mut R,
    header: &Header,
    record_data_length: u64,
    current_path: &Path,
    index: &mut Vec<RecordDataPointer>,
) -> Result<()> {
    let type_id = read_le_uint(r, header.record_typeid_field_size)
        .map_err(|_| BinoutError::DataTypeIdTruncated)?;
    let type_id = Type::from(type_id);

    let mut name_len_buf = [0u8; 1];
    r.read_exact(&mut name_len_buf)
        .map_err(|_| BinoutError::DataNameLengthTruncated)?;
    let name_length = name_len_buf[0] as u64;

    let mut name_buf = vec![0u8; name_length as usize];
    r.read_exact(&mut name_buf)
        .map_err(|_| BinoutError::DataNameTruncated)?;
    let name = String::from_utf8_lossy(&name_buf).into_owned();

    let consumed = header.record_typeid_field_size as u64 + 1 + name_length;
    let data_length = record_data_length.saturating_sub(consumed);

    let file_pos = r.stream_position().map_err(BinoutError::Io)?;

    r.seek(SeekFrom::Current(data_length as i64))
        .map_err(|_| BinoutError::DataSkipFailed)?;

    let mut full_path = current_path.clone();
    full_path.push(name.clone());

    let dp = match index
        .iter_mut()
        .find(|dp| dp.name == name && dp.parent_path().main_equals(&full_path))
    {
        Some(dp) => {
            if dp.data_length != data_length {
                return Err(BinoutError::InconsistentDataLength);
            }
            dp
        }
        None => {
            index.push(RecordDataPointer {
                name,
                type_id,
                data_length,
                records: Vec::new(),
            });
            index.last_mut().expect("just pushed")
        }
    };

    match dp.find_mut(current_path) {
        Some(record) => record.file_pos = file_pos,
        None => dp.records.push(RecordData {
            path: current_path.clone(),
            file_pos,
        }),
    }

    Ok(())
}
