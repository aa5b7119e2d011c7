/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth: 認可 gate (route 単位)
 * - cors / http: Router 全体に掛ける横断的な layer
 */
pub mod auth;
pub mod cors;
pub mod http;
