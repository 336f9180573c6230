// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Time related utils.

use chrono::Utc;

/// DateTime is the alias of chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Timestamp format used by `X-11Paths-Date`: "2015-06-23 12:48:17"
const UTC_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into the `X-11Paths-Date` timestamp: "2015-06-23 12:48:17"
///
/// The value is always UTC and carries no offset suffix.
pub fn format_utc_timestamp(t: DateTime) -> String {
    t.format(UTC_TIMESTAMP).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_utc_timestamp() {
        let t = Utc.with_ymd_and_hms(2015, 6, 23, 12, 48, 17).unwrap();
        assert_eq!(format_utc_timestamp(t), "2015-06-23 12:48:17");

        let t = Utc.with_ymd_and_hms(2022, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_utc_timestamp(t), "2022-01-02 03:04:05");
    }

    #[test]
    fn test_format_utc_timestamp_drops_subseconds() {
        let t = Utc.with_ymd_and_hms(2015, 6, 23, 12, 48, 17).unwrap()
            + chrono::Duration::milliseconds(999);
        assert_eq!(format_utc_timestamp(t), "2015-06-23 12:48:17");
    }
}
