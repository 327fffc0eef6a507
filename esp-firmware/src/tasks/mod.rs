// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Der Frame-Receiver schreibt in den SharedFrameSlot, der Light-Task liest daraus.

pub mod light_output;
pub mod power_supervisor;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use light_output::{light_output_logic, light_output_task};
pub use power_supervisor::power_supervisor_task;
pub use wifi::{connection_task, dhcp_task, net_task};
