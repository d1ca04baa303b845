// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::http::HeaderMap;
use ipnet::{AddrParseError, IpNet};
use std::net::{IpAddr, SocketAddr};

/// 解析客户端地址
///
/// 依次取 `X-Forwarded-For` 的第一个地址、`X-Real-IP`、对端套接字地址
///
/// # 参数
///
/// * `headers` - 请求头
/// * `peer` - 对端地址，未启用连接信息时为 `None`
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<IpAddr> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse::<IpAddr>().ok());
    if forwarded.is_some() {
        return forwarded;
    }

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<IpAddr>().ok());
    if real_ip.is_some() {
        return real_ip;
    }

    peer.map(|addr| addr.ip())
}

/// 解析 CIDR 网段列表
pub fn parse_subnets(raw: &[String]) -> Result<Vec<IpNet>, AddrParseError> {
    raw.iter().map(|s| s.trim().parse::<IpNet>()).collect()
}

/// 地址是否落在任一网段内
pub fn is_in_allowed_subnet(ip: IpAddr, subnets: &[IpNet]) -> bool {
    subnets.iter().any(|net| net.contains(&ip))
}
