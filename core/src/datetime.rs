// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod parser;
mod util;

pub use parser::{DateInputParser, is_date_only};
pub use util::{add_days, from_local_datetime, start_of_day};
