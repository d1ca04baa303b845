// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

mod helpers;

mod auth_test;
mod commands_test;
mod rate_limit_test;
mod report_test;
mod validation_test;
