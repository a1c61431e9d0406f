pub mod text_buffer;
