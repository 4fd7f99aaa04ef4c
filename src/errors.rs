//! Error module. See the [error-chain](https://crates.io/crates/error-chain) crate for details.

error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Nix(::nix::Error);
    }

    errors {
        /// The line buffer could not grow to hold more input
        Allocation {
            description("memory allocation failed")
            display("Unable to allocate memory")
        }
        /// A new process could not be created
        Fork(reason: String) {
            description("process creation failed")
            display("fork failed: {}", reason)
        }
        /// `cd` was given a directory it cannot enter
        ChangeDirectory(dir: String) {
            description("no such directory")
            display("cd: {} no such file or directory", dir)
        }
        /// An argument cannot be handed to a new program image
        InvalidArgument(arg: String) {
            description("invalid argument")
            display("{:?}: argument contains a NUL byte", arg)
        }
    }
}

impl ErrorKind {
    /// Fatal errors terminate the shell; every other kind is reported and the
    /// loop continues.
    pub fn is_fatal(&self) -> bool {
        match *self {
            ErrorKind::Allocation | ErrorKind::Fork(_) => true,
            _ => false,
        }
    }
}
