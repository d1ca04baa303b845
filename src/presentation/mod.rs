// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod commands;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod state;
