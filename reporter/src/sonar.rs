// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! SonarQube generic test coverage XML.
//!
//! Layout:
//!
//! ```xml
//! <coverage version="1">
//!   <file path="/my/source.cpp">
//!     <lineToCover lineNumber="1" covered="false"/>
//!   </file>
//! </coverage>
//! ```

use std::io::Cursor;

use anyhow::Result;
use collector::ExecutableLines;
use quick_xml::Writer;

pub fn render(lines: &ExecutableLines) -> Result<String> {
    let mut data = Vec::new();
    let cursor = Cursor::new(&mut data);
    let mut writer = Writer::new_with_indent(cursor, b' ', 2);

    writer
        .create_element("coverage")
        .with_attributes([("version", "1")])
        .write_inner_content(|writer| {
            for (path, file) in &lines.files {
                // The tuple-to-attribute conversion escapes the value;
                // escaping here as well would double-encode the path.
                let path = path.to_string_lossy();

                writer
                    .create_element("file")
                    .with_attributes([("path", &*path)])
                    .write_inner_content(|writer| {
                        for line in &file.lines {
                            let number = line.to_string();

                            writer
                                .create_element("lineToCover")
                                .with_attributes([
                                    ("lineNumber", number.as_str()),
                                    ("covered", "false"),
                                ])
                                .write_empty()?;
                        }

                        Ok(())
                    })?;
            }

            Ok(())
        })?;

    let text = String::from_utf8(data)?;
    Ok(text)
}
