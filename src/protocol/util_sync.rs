pub(crate) fn parse_bytes(len: usize, rdr: &mut dyn std::io::Read) -> std::io::Result<Vec<u8>> {
    let mut vec = vec![0_u8; len];
    rdr.read_exact(&mut vec)?;
    Ok(vec)
}
