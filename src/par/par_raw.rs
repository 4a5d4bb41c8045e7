use std::{io, panic, thread};

use crate::par::cached_available_parallelism;

/// Runs `b` on a new scoped thread and `a` on this one.
#[inline(always)]
pub fn join<A, B, RA, RB>(a: A, b: B) -> io::Result<(RA, RB)>
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    thread::scope(|s| {
        let handle = thread::Builder::new().spawn_scoped(s, b)?;
        let ra = a();
        match handle.join() {
            Ok(rb) => Ok((ra, rb)),
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}

#[inline(always)]
pub fn par_map<T, F>(data: &mut [T], func: &F, chunks: u32) -> io::Result<()>
where
    T: Send + Sync,
    F: Fn(usize, &mut T) + Send + Sync,
{
    if data.is_empty() {
        return Ok(());
    }
    // Limit the max number of chunks in this case since they are actual threads
    let max_chunks = cached_available_parallelism() * 6;

    let chunk_count = (chunks as usize).max(1).min(max_chunks);
    let chunk_size = data.len().div_ceil(chunk_count);
    par_chunks_mut(
        data,
        &|chunk_id, chunk: &mut [T]| {
            let start = chunk_id * chunk_size;
            for (i, output) in chunk.iter_mut().enumerate() {
                func(start + i, output);
            }
        },
        chunk_size,
    )
}

#[inline(always)]
pub fn par_chunks_mut<T, F>(data: &mut [T], func: &F, chunk_size: usize) -> io::Result<()>
where
    T: Send + Sync,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if data.is_empty() {
        return Ok(());
    }
    let chunk_size = chunk_size.max(1);
    let chunk_count = data.len().div_ceil(chunk_size);
    if chunk_count == 1 {
        func(0, data);
        return Ok(());
    }
    thread::scope(|s| {
        let mut slice = data;
        for chunk_id in 0..chunk_count {
            let slice_len = slice.len();
            let (left, right) = slice.split_at_mut(chunk_size.min(slice_len));
            slice = right;
            if chunk_id == chunk_count - 1 {
                func(chunk_id, left) // Run the last one on this thread
            } else {
                thread::Builder::new().spawn_scoped(s, move || func(chunk_id, left))?;
            }
        }
        Ok(())
    })
}

#[inline(always)]
pub fn par_chunks<T, F>(data: &[T], func: &F, chunk_size: usize) -> io::Result<()>
where
    T: Send + Sync,
    F: Fn(usize, &[T]) + Send + Sync,
{
    if data.is_empty() {
        return Ok(());
    }
    let chunk_size = chunk_size.max(1);
    let chunk_count = data.len().div_ceil(chunk_size);
    if chunk_count == 1 {
        func(0, data);
        return Ok(());
    }
    thread::scope(|s| {
        let mut slice = data;
        for chunk_id in 0..chunk_count {
            let slice_len = slice.len();
            let (left, right) = slice.split_at(chunk_size.min(slice_len));
            slice = right;
            if chunk_id == chunk_count - 1 {
                func(chunk_id, left) // Run the last one on this thread
            } else {
                thread::Builder::new().spawn_scoped(s, move || func(chunk_id, left))?;
            }
        }
        Ok(())
    })
}
