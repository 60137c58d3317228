pub mod memos;
