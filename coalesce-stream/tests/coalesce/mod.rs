// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod coalesce_error_tests;
pub mod coalesce_teardown_tests;
pub mod operator_tests;
