pub mod cup_draw;
pub mod round_robin;

pub use cup_draw::draw_round;
pub use round_robin::double_round_robin;
