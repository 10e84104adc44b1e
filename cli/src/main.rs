// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! ical - manage calendar events from the command line

use std::process::ExitCode;

use ical_cli::run;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}
