pub mod hanoi;
