//! Title art printed at the top of every report.

/// "FullMoon" in the FIGlet standard font.
pub const BANNER: &str = r" _____      _ _ __  __                   
|  ___|   _| | |  \/  | ___   ___  _ __  
| |_ | | | | | | |\/| |/ _ \ / _ \| '_ \ 
|  _|| |_| | | | |  | | (_) | (_) | | | |
|_|   \__,_|_|_|_|  |_|\___/ \___/|_| |_|
";
