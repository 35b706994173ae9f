/*
[INPUT]:  Interactive terminal session
[OUTPUT]: Menu-driven trading flow and config scaffolding
[POS]:    CLI layer - user-facing commands of the binary
[UPDATE]: When adding interactive commands
*/

pub mod init;
pub mod interactive;
