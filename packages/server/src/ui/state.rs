//! Server state shared by every handler.

use std::sync::Arc;

use crate::{
    domain::ClientRegistry,
    usecase::{JoinSessionUseCase, LeaveSessionUseCase, ListClientsUseCase, MessageRouter},
};

/// Shared application state
pub struct AppState {
    /// Registry（セッションが自分のメールボックスを drain するため）
    pub registry: Arc<dyn ClientRegistry>,
    /// MessageRouter（受信メッセージの配送）
    pub router: Arc<MessageRouter>,
    /// JoinSessionUseCase（セッション参加のユースケース）
    pub join_session_usecase: Arc<JoinSessionUseCase>,
    /// LeaveSessionUseCase（セッション退出のユースケース）
    pub leave_session_usecase: Arc<LeaveSessionUseCase>,
    /// ListClientsUseCase（接続中クライアント一覧のユースケース）
    pub list_clients_usecase: Arc<ListClientsUseCase>,
}
