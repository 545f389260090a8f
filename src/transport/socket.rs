//! Socket construction shared by senders and the receiver.
//!
//! Both directions bind the protocol port with address reuse so several
//! processes on one host can take part at the same time. Send sockets
//! additionally get broadcast permission and, on Unix, `SO_DONTROUTE` so
//! datagrams go out on the local segment instead of via a gateway route.

use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{Ipv4Addr, SocketAddrV4};
use tokio::net::UdpSocket;

/// Bind a broadcast-capable send socket to `(local, port)`.
///
/// Must be called from within a Tokio runtime.
pub(crate) fn bind_broadcast_socket(local: Ipv4Addr, port: u16) -> io::Result<UdpSocket> {
    let socket = raw_socket()?;
    socket.set_broadcast(true)?;
    set_dont_route(&socket)?;
    socket.bind(&SocketAddrV4::new(local, port).into())?;
    UdpSocket::from_std(socket.into())
}

/// Bind a receive socket to `(0.0.0.0, port)`.
///
/// Must be called from within a Tokio runtime.
pub(crate) fn bind_listener_socket(port: u16) -> io::Result<UdpSocket> {
    let socket = raw_socket()?;
    socket.bind(&SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port).into())?;
    UdpSocket::from_std(socket.into())
}

fn raw_socket() -> io::Result<Socket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    // Address reuse lets multiple listener processes coexist on one host.
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    Ok(socket)
}

// socket2 has no safe wrapper for SO_DONTROUTE.
#[cfg(unix)]
fn set_dont_route(socket: &Socket) -> io::Result<()> {
    use std::os::fd::AsRawFd;

    let enable: libc::c_int = 1;
    let rc = unsafe {
        libc::setsockopt(
            socket.as_raw_fd(),
            libc::SOL_SOCKET,
            libc::SO_DONTROUTE,
            std::ptr::addr_of!(enable).cast(),
            std::mem::size_of::<libc::c_int>() as libc::socklen_t,
        )
    };

    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn set_dont_route(_socket: &Socket) -> io::Result<()> {
    Ok(())
}
